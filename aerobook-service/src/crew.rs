use aerobook_core::repository::CrewMemberRepository;
use aerobook_core::{CrewMember, NewCrewMember, Repositories};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{require_fields, ServiceError, ServiceResult};

#[derive(Clone)]
pub struct CrewMemberService {
    crew: Arc<dyn CrewMemberRepository>,
}

impl CrewMemberService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            crew: repos.crew.clone(),
        }
    }

    pub async fn create_crew_member(&self, input: NewCrewMember) -> ServiceResult<CrewMember> {
        debug!("create_crew_member called with: {:?}", input);
        require_fields(&[("name", &input.name), ("role", &input.role)])?;

        let saved = self.crew.save(&CrewMember::new(input)).await?;
        info!("Crew member {} persisted with ID: {}", saved.name, saved.id);
        Ok(saved)
    }

    pub async fn retrieve_all(&self) -> ServiceResult<Vec<CrewMember>> {
        debug!("retrieve_all crew members called");
        Ok(self.crew.find_all().await?)
    }

    pub async fn retrieve_by_id(&self, id: Uuid) -> ServiceResult<CrewMember> {
        debug!("retrieve_by_id called with ID: {}", id);
        self.crew
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Crew member", id))
    }

    /// Replaces name and role. The flight assignment is left untouched.
    pub async fn update_crew_member(&self, id: Uuid, input: NewCrewMember) -> ServiceResult<CrewMember> {
        debug!("update_crew_member called with ID: {} - and {:?}", id, input);
        require_fields(&[("name", &input.name), ("role", &input.role)])?;

        let mut existing = self.retrieve_by_id(id).await?;
        existing.name = input.name.trim().to_string();
        existing.role = input.role.trim().to_string();

        let saved = self.crew.save(&existing).await?;
        info!("Crew member {} updated", saved.id);
        Ok(saved)
    }

    pub async fn delete_by_id(&self, id: Uuid) -> ServiceResult<()> {
        debug!("delete_by_id called with ID: {}", id);
        self.retrieve_by_id(id).await?;

        self.crew.delete_by_id(id).await?;
        info!("Crew member {} deleted", id);
        Ok(())
    }
}
