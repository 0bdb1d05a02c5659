//! Random numeric ids for designer-generated templates and triggers.

use composer_core::service::id::IdGenerator;

/// Decimal rendering of a random `u32`, e.g. `"2875133208"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next(&self) -> String {
        let bytes = uuid::Uuid::new_v4().into_bytes();
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]).to_string()
    }
}
