use cf_engine::{InMemoryLibrary, SimilarityTable};
use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING: Once = Once::new();

/// Route engine logs to the test writer; filter with RUST_LOG.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer())
            .with(EnvFilter::from_default_env())
            .try_init();
    });
}

/// Deterministic synthetic corpus: `users` users, `items` items, roughly a third rated.
///
/// Items `items` and `items + 1` exist but are never rated.
pub fn synthetic_corpus(
    users: u32,
    items: u32,
) -> (InMemoryLibrary<u32, u32>, SimilarityTable<u32>) {
    let mut library = InMemoryLibrary::new();
    for item in 0..items + 2 {
        library.insert_item(item);
    }
    for user in 0..users {
        for item in 0..items {
            let hash = (user as u64 * 7_919 + item as u64 * 104_729) % 97;
            if hash % 3 == 0 {
                let rating = 1.0 + (hash % 5) as f64;
                library
                    .insert_rating(user, item, rating)
                    .expect("finite rating");
            }
        }
    }

    let mut similarity = SimilarityTable::new();
    for user in 0..users {
        for other in (user + 1)..users {
            let raw = ((user as u64 * 31 + other as u64 * 17) % 201) as f64;
            similarity.insert(user, other, raw / 100.0 - 1.0);
        }
    }

    (library, similarity)
}
