//! In-process gateway for tests and ephemeral sessions.

use super::{GatewayResult, PersistenceError, PersistenceGateway};
use crate::model::entity::Entity;

/// Vec-backed gateway with no durability.
///
/// `failing()` builds a variant whose saves always error, used to exercise
/// the store's fail-open persistence contract.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    entities: Vec<Entity>,
    fail_saves: bool,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a pre-seeded collection.
    pub fn with_entities(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            fail_saves: false,
        }
    }

    /// Builds a gateway that rejects every save.
    pub fn failing() -> Self {
        Self {
            entities: Vec::new(),
            fail_saves: true,
        }
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self) -> GatewayResult<Vec<Entity>> {
        Ok(self.entities.clone())
    }

    fn save(&mut self, entities: &[Entity]) -> GatewayResult<()> {
        if self.fail_saves {
            return Err(PersistenceError::Unavailable(
                "memory gateway configured to fail saves".to_string(),
            ));
        }
        self.entities = entities.to_vec();
        Ok(())
    }
}
