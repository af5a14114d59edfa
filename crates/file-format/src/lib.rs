pub mod dump;
pub mod errors;
pub mod load;
pub mod metadata;
pub mod migrate;
pub mod version;

pub use dump::{
    dump_molding, save_document, LegacyIndex, LegacyOpening, MoldingDump, TopoPatherDump, FORMAT_NAME,
};
pub use errors::{DumpError, LoadError};
pub use load::{load_document, load_molding, LoadedDocument};
pub use metadata::DocumentMetadata;
pub use migrate::{HostFaceResolver, HostFaceTable};
pub use version::{is_earlier_than, FORMAT_VERSION};
