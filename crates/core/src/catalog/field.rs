//! Known catalog columns and the sheet headers they are read from.

use serde::{Deserialize, Serialize};

/// A catalog attribute addressed by its sheet header.
///
/// The schema is header-driven: every column of the sheet is kept on the
/// record, and these variants name the ones the catalog gives meaning to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    OriginalTitle,
    Country,
    Year,
    Footage,
    Synopsis,
    Group,
    Genre,
    Orientation,
    Tags,
    Director,
    SourceMaterial,
    Studio,
    Cast,
    Photography,
    Music,
    Comments,
    Special,
    Runtime,
    Scale,
    Cover,
    Stream,
    Trailer,
    Flag,
    FootageIcon,
}

impl Field {
    /// Fields consulted by free-text search, in evaluation order.
    pub const SEARCHABLE: [Field; 18] = [
        Field::OriginalTitle,
        Field::Title,
        Field::Country,
        Field::Year,
        Field::Footage,
        Field::Synopsis,
        Field::Group,
        Field::Genre,
        Field::Orientation,
        Field::Tags,
        Field::Director,
        Field::SourceMaterial,
        Field::Studio,
        Field::Cast,
        Field::Photography,
        Field::Music,
        Field::Comments,
        Field::Special,
    ];

    /// Header of the sheet column holding this field.
    pub fn header(self) -> &'static str {
        match self {
            Field::Title => "Título en español",
            Field::OriginalTitle => "Título original",
            Field::Country => "País",
            Field::Year => "Año",
            Field::Footage => "Metraje",
            Field::Synopsis => "Sinopsis",
            Field::Group => "Grupo",
            Field::Genre => "Género",
            Field::Orientation => "Orientación",
            Field::Tags => "Perversiones",
            Field::Director => "Realizador",
            Field::SourceMaterial => "Libro",
            Field::Studio => "Estudio",
            Field::Cast => "Reparto",
            Field::Photography => "Fotografía",
            Field::Music => "Música",
            Field::Comments => "Comentarios",
            Field::Special => "Especial",
            Field::Runtime => "Duración",
            Field::Scale => "Escala",
            Field::Cover => "Portada",
            Field::Stream => "Stream",
            Field::Trailer => "Trailer",
            Field::Flag => "Bandera",
            Field::FootageIcon => "ÍconoMetraje",
        }
    }

    pub fn is_searchable(self) -> bool {
        Self::SEARCHABLE.contains(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_searchable_fields_are_distinct() {
        let headers: HashSet<_> = Field::SEARCHABLE.iter().map(|f| f.header()).collect();
        assert_eq!(headers.len(), 18);
    }

    #[test]
    fn test_media_fields_are_not_searchable() {
        assert!(!Field::Cover.is_searchable());
        assert!(!Field::Stream.is_searchable());
        assert!(!Field::Trailer.is_searchable());
        assert!(Field::Genre.is_searchable());
        assert!(Field::Year.is_searchable());
    }
}
