//! Testing utilities: a controllable source and sheet fixtures.

mod mock_source;

pub use mock_source::MockSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::Field;

    /// Header row used by the fixtures.
    pub fn header() -> Vec<String> {
        let mut header = vec!["index".to_string()];
        header.extend(
            [
                Field::Title,
                Field::OriginalTitle,
                Field::Year,
                Field::Genre,
                Field::Country,
                Field::Director,
                Field::Runtime,
                Field::Scale,
                Field::Cover,
                Field::Stream,
                Field::Trailer,
            ]
            .iter()
            .map(|f| f.header().to_string()),
        );
        header
    }

    /// One data row matching [`header`].
    pub fn catalog_row(index: u64, title: &str, genre: &str, country: &str) -> Vec<String> {
        vec![
            index.to_string(),
            title.to_string(),
            String::new(),
            (1950 + index % 70).to_string(),
            genre.to_string(),
            country.to_string(),
            format!("Director {}", index),
            "Largometraje".to_string(),
            (index % 6).to_string(),
            format!("https://img.example/{}.jpg", index),
            format!("https://stream.example/{}", index),
            format!("https://www.youtube.com/watch?v=trailer{}", index),
        ]
    }

    /// Header plus `count` covered records with ids 1..=count.
    ///
    /// Record 7 (when present) is an Argentine comedy; the rest are
    /// alternately Chilean dramas and Peruvian thrillers.
    pub fn catalog_rows(count: u64) -> Vec<Vec<String>> {
        let mut rows = vec![header()];
        rows.extend((1..=count).map(|i| {
            let (genre, country) = if i == 7 {
                ("Comedy", "Argentina")
            } else if i % 2 == 0 {
                ("Drama", "Chile")
            } else {
                ("Thriller", "Perú")
            };
            catalog_row(i, &format!("Película {}", i), genre, country)
        }));
        rows
    }
}
