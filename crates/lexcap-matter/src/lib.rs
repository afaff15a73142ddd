//! lexcap-matter
//!
//! Question answering over the documents of one M&A matter. Answers cite the
//! document sections they were drawn from.

pub mod documents;
pub mod qa;

pub use documents::{DocumentSection, MatterDocument, MatterLibrary, SampleQuestion};
pub use qa::{format_time, Citation, MatterAssistant, MatterError, QaResponse};
