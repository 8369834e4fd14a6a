use uuid::Uuid;

use crate::application::validation::dotted_extension_of;

/// Mints a storage name: a random v4 UUID followed by the original extension, dot included.
pub fn generate_storage_name(original_name: &str) -> String {
    format!("{}{}", Uuid::new_v4(), dotted_extension_of(original_name))
}
