use rand::prelude::SliceRandom;
use rand::{thread_rng, Rng};

use bookshelf_service::api::{BookPayload, ListBooksQuery};
use bookshelf_service::client::BookshelfClient;

const WORDS: [&str; 12] = [
    "night", "river", "glass", "empire", "garden", "winter", "shadow", "letter", "island",
    "machine", "silent", "harbor",
];

fn generate_books<R: Rng>(rng: &mut R, count: usize) -> Vec<BookPayload> {
    (0..count)
        .map(|_| {
            let title: Vec<&str> = WORDS.choose_multiple(rng, 2).cloned().collect();
            let page_count = rng.gen_range(50..800);
            BookPayload {
                name: Some(title.join(" ")),
                year: Some(rng.gen_range(1900..2025)),
                author: Some(format!("Author{}", rng.gen_range(0..50))),
                summary: None,
                publisher: Some(format!("Publisher{}", rng.gen_range(0..10))),
                page_count: Some(page_count),
                read_page: Some(rng.gen_range(0..=page_count)),
                reading: Some(rng.gen_bool(0.5)),
            }
        })
        .collect()
}

#[tokio::test]
async fn generate_lots_of_books_and_query_them() {
    const NO_OF_BOOKS_TO_GENERATE: usize = 200;
    const NO_OF_UPDATES: usize = 100;
    const NO_OF_DELETES: usize = 50;

    let mut rng = thread_rng();
    let bookshelf_url =
        std::env::var("BOOKSHELF_URL").unwrap_or("http://127.0.0.1:8080".to_string());
    let client = BookshelfClient::new(&bookshelf_url).expect("Failed to create client");

    let mut book_ids = vec![];
    for book in generate_books(&mut rng, NO_OF_BOOKS_TO_GENERATE) {
        let book_id = client.add_book(&book).await.expect("Failed to add book");
        println!("Added book {}", book_id);
        book_ids.push(book_id);
    }

    for update in generate_books(&mut rng, NO_OF_UPDATES) {
        let book_id = book_ids.choose(&mut rng).unwrap();
        let updated = client
            .update_book(book_id, &update)
            .await
            .expect("Failed to update book");
        assert!(updated);
    }

    book_ids.shuffle(&mut rng);
    for book_id in book_ids.drain(..NO_OF_DELETES) {
        assert!(client.delete_book(&book_id).await.expect("Failed to delete book"));
    }

    let all_books = client
        .list_books(&ListBooksQuery::default())
        .await
        .expect("Failed to list books");
    for book_id in &book_ids {
        assert!(all_books.iter().any(|summary| &summary.id == book_id));
    }

    for word in WORDS {
        let books = client
            .list_books(&ListBooksQuery {
                name: Some(word.to_string()),
                finished: Some("0".to_string()),
                ..ListBooksQuery::default()
            })
            .await
            .expect("Failed to list books");
        println!("{} unfinished books matching {}", books.len(), word);
    }
}
