//! In-memory officials pool
//!
//! Keyed by official id. Crews are assembled from the pool and share the
//! pooled records through `Arc`; toggling an official afterwards does not
//! touch crews that were already handed out.

use std::collections::HashMap;
use std::sync::Arc;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use validator::Validate;

use crate::error::{CoreError, Result};
use crate::models::{CrewAssignment, OfficialModel, OfficialRole};

const ROLES: [OfficialRole; 4] =
    [OfficialRole::Referee, OfficialRole::AssistantLeft, OfficialRole::AssistantRight, OfficialRole::Var];

#[derive(Debug, Clone, Default)]
pub struct OfficialPool {
    officials: HashMap<String, Arc<OfficialModel>>,
}

impl OfficialPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// One generated official per role, reproducible from `seed`.
    ///
    /// Attribute ranges: strictness 40-90, advantage 30-80, offside tolerance
    /// 40-85, VAR propensity 20-70, consistency 50-95, fitness 60-95,
    /// reputation 40-90.
    pub fn synthetic(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut pool = Self::new();
        for role in ROLES {
            let official = synthetic_official(&mut rng, role);
            pool.officials.insert(official.official_id.clone(), Arc::new(official));
        }
        debug!(seed, size = pool.len(), "synthetic officials generated");
        pool
    }

    /// Parses a JSON array of officials into a pool.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let officials: Vec<OfficialModel> = serde_json::from_str(content)?;
        let mut pool = Self::new();
        for official in officials {
            pool.insert(official)?;
        }
        Ok(pool)
    }

    pub fn len(&self) -> usize {
        self.officials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.officials.is_empty()
    }

    pub fn get(&self, official_id: &str) -> Option<Arc<OfficialModel>> {
        self.officials.get(official_id).cloned()
    }

    /// Adds or replaces an official. Attributes must be within 0-100.
    pub fn insert(&mut self, official: OfficialModel) -> Result<()> {
        official.validate()?;
        self.officials.insert(official.official_id.clone(), Arc::new(official));
        Ok(())
    }

    /// Sorted referee, assistants, VAR; ids break ties.
    pub fn list(&self) -> Vec<Arc<OfficialModel>> {
        let mut all: Vec<_> = self.officials.values().cloned().collect();
        all.sort_by(|a, b| {
            a.role.sort_rank().cmp(&b.role.sort_rank()).then_with(|| a.official_id.cmp(&b.official_id))
        });
        all
    }

    pub fn set_active(&mut self, official_id: &str, active: bool) -> Result<()> {
        let official = self
            .officials
            .get_mut(official_id)
            .ok_or_else(|| CoreError::NotFound(format!("Official not found: {}", official_id)))?;
        Arc::make_mut(official).active = active;
        Ok(())
    }

    /// Builds a crew from explicit ids, checking roles and availability.
    pub fn assemble_crew(
        &self,
        referee: &str,
        assistant_left: &str,
        assistant_right: &str,
        var_official: Option<&str>,
    ) -> Result<CrewAssignment> {
        Ok(CrewAssignment {
            referee: self.lookup(referee, OfficialRole::Referee)?,
            assistant_left: self.lookup(assistant_left, OfficialRole::AssistantLeft)?,
            assistant_right: self.lookup(assistant_right, OfficialRole::AssistantRight)?,
            var_official: var_official.map(|id| self.lookup(id, OfficialRole::Var)).transpose()?,
        })
    }

    /// First active official of each role in listing order. VAR is optional.
    pub fn default_crew(&self) -> Result<CrewAssignment> {
        let listed = self.list();
        let first = |role: OfficialRole| listed.iter().find(|o| o.role == role && o.active).cloned();
        let required = |role: OfficialRole| {
            first(role).ok_or_else(|| CoreError::NotFound(format!("No active official for role {:?}", role)))
        };
        Ok(CrewAssignment {
            referee: required(OfficialRole::Referee)?,
            assistant_left: required(OfficialRole::AssistantLeft)?,
            assistant_right: required(OfficialRole::AssistantRight)?,
            var_official: first(OfficialRole::Var),
        })
    }

    fn lookup(&self, official_id: &str, role: OfficialRole) -> Result<Arc<OfficialModel>> {
        let official = self
            .get(official_id)
            .ok_or_else(|| CoreError::NotFound(format!("Official not found: {}", official_id)))?;
        if official.role != role {
            return Err(CoreError::InvalidParameter(format!(
                "Official {} is {:?}, expected {:?}",
                official_id, official.role, role
            )));
        }
        if !official.active {
            return Err(CoreError::InvalidParameter(format!("Official {} is inactive", official_id)));
        }
        Ok(official)
    }
}

fn synthetic_official<R: RngCore>(rng: &mut R, role: OfficialRole) -> OfficialModel {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    let id = uuid::Builder::from_random_bytes(bytes).into_uuid();

    OfficialModel {
        official_id: format!("{}-{}", role.id_prefix(), id),
        role,
        strictness: rng.gen_range(40..=90),
        advantage_tendency: rng.gen_range(30..=80),
        offside_tolerance: rng.gen_range(40..=85),
        var_propensity: rng.gen_range(20..=70),
        consistency: rng.gen_range(50..=95),
        fitness: rng.gen_range(60..=95),
        reputation: rng.gen_range(40..=90),
        ai_seed: rng.gen_range(0..1_000_000),
        active: true,
    }
}
