pub mod scenario;
pub mod util;

pub use util::{FailureArtifacts, artifacts_dir, split_csv};
