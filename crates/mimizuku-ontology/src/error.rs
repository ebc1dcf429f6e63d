use thiserror::Error;

/// Errors raised while reading an ontology file.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("cannot detect ontology format for {0:?}; pass the format explicitly")]
    UnknownFormat(String),
}
