use shared::{
    CreateMarketingMaterialRequest, DeleteMarketingMaterialResponse, MarketingMaterial,
    MarketingMaterialListResponse, UpdateMarketingMaterialRequest,
};

use crate::domain::commands::materials::{
    CreateMarketingMaterialCommand, UpdateMarketingMaterialCommand,
};
use crate::domain::models::marketing_material::MarketingMaterial as DomainMarketingMaterial;

pub struct MarketingMaterialMapper;

impl MarketingMaterialMapper {
    pub fn to_dto(domain: DomainMarketingMaterial) -> MarketingMaterial {
        MarketingMaterial {
            id: domain.id,
            event_id: domain.event_id,
            title: domain.title,
            material_type: domain.material_type,
            status: domain.status,
            link: domain.link,
            notes: domain.notes,
            due_date: domain.due_date,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_list_response(
        materials: Vec<DomainMarketingMaterial>,
    ) -> MarketingMaterialListResponse {
        MarketingMaterialListResponse {
            materials: materials.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_delete_response(domain: DomainMarketingMaterial) -> DeleteMarketingMaterialResponse {
        DeleteMarketingMaterialResponse {
            success_message: format!("Deleted marketing material '{}'", domain.title),
            deleted_material_id: domain.id,
        }
    }

    pub fn to_create_command(
        request: CreateMarketingMaterialRequest,
    ) -> CreateMarketingMaterialCommand {
        CreateMarketingMaterialCommand {
            event_id: request.event_id,
            title: request.title,
            material_type: request.material_type,
            status: request.status,
            link: request.link,
            notes: request.notes,
            due_date: request.due_date,
        }
    }

    pub fn to_update_command(
        material_id: String,
        request: UpdateMarketingMaterialRequest,
    ) -> UpdateMarketingMaterialCommand {
        UpdateMarketingMaterialCommand {
            material_id,
            title: request.title,
            material_type: request.material_type,
            status: request.status,
            link: request.link,
            notes: request.notes,
            due_date: request.due_date,
        }
    }
}
