pub mod extractor;
pub mod url_parts;

pub use extractor::FeatureExtractor;
pub use url_parts::UrlParts;
