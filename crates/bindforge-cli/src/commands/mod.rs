pub mod check;
pub mod config;
pub mod design;

use crate::error::Result;
use bindforge::core::protocol::ProtocolSettings;
use std::path::Path;
use tracing::info;

pub(crate) fn load_protocol(path: Option<&Path>) -> Result<ProtocolSettings> {
    match path {
        Some(path) => {
            let protocol = ProtocolSettings::from_file(path)?;
            info!("Loaded protocol overrides from {}", path.display());
            Ok(protocol)
        }
        None => Ok(ProtocolSettings::default()),
    }
}
