pub mod frequency;
pub mod normalizer;
pub mod stopwords;
