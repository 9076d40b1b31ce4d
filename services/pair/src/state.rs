use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbGameRepository, DbMissYouRepository, DbNotificationLogRepository, DbPartnershipRepository,
    DbUserRepository,
};
use crate::infra::generator::OllamaGenerator;
use crate::infra::push::HttpPushDispatcher;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub generator: OllamaGenerator,
    pub push: HttpPushDispatcher,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn partnership_repo(&self) -> DbPartnershipRepository {
        DbPartnershipRepository {
            db: self.db.clone(),
        }
    }

    pub fn game_repo(&self) -> DbGameRepository {
        DbGameRepository {
            db: self.db.clone(),
        }
    }

    pub fn missyou_repo(&self) -> DbMissYouRepository {
        DbMissYouRepository {
            db: self.db.clone(),
        }
    }

    pub fn notification_log_repo(&self) -> DbNotificationLogRepository {
        DbNotificationLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn generator(&self) -> OllamaGenerator {
        self.generator.clone()
    }

    pub fn push(&self) -> HttpPushDispatcher {
        self.push.clone()
    }
}
