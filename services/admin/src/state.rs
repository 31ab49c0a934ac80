use sea_orm::DatabaseConnection;

use crate::config::SchoolDefaults;
use crate::infra::db::{
    DbCatalogRepository, DbGrantRepository, DbGuardianRepository, DbMembershipRepository,
    DbResourceRepository, DbSchoolRepository, DbStatsRepository, DbSubjectRepository,
    DbUnitRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub school_defaults: SchoolDefaults,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn school_repo(&self) -> DbSchoolRepository {
        DbSchoolRepository {
            db: self.db.clone(),
        }
    }

    pub fn unit_repo(&self) -> DbUnitRepository {
        DbUnitRepository {
            db: self.db.clone(),
        }
    }

    pub fn subject_repo(&self) -> DbSubjectRepository {
        DbSubjectRepository {
            db: self.db.clone(),
        }
    }

    pub fn membership_repo(&self) -> DbMembershipRepository {
        DbMembershipRepository {
            db: self.db.clone(),
        }
    }

    pub fn guardian_repo(&self) -> DbGuardianRepository {
        DbGuardianRepository {
            db: self.db.clone(),
        }
    }

    pub fn grant_repo(&self) -> DbGrantRepository {
        DbGrantRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog_repo(&self) -> DbCatalogRepository {
        DbCatalogRepository {
            db: self.db.clone(),
        }
    }

    pub fn resource_repo(&self) -> DbResourceRepository {
        DbResourceRepository {
            db: self.db.clone(),
        }
    }

    pub fn stats_repo(&self) -> DbStatsRepository {
        DbStatsRepository {
            db: self.db.clone(),
        }
    }
}
