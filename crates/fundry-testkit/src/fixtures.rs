//! Template models and a ready-made test environment.
//!
//! Templates are minimal-but-valid instances; tests override the fields
//! they care about. The environment builder wires the scripted services
//! into a real [`AppEnvironment`] with a fixed shuffle seed, and hands
//! back the handles tests assert against.

use std::sync::Arc;

use fundry_app::config::AppConfig;
use fundry_app::environment::{AppEnvironment, Services};
use fundry_app::viewmodels::pledge_summary::{BackingState, PledgeSummaryData};
use fundry_app::viewmodels::thanks::ThanksPageData;
use fundry_core::models::{
    Avatar, Category, CategoryId, Newsletters, Project, ProjectCategory, ProjectId, ProjectState,
    ProjectUpdate, ProjectUrls, Reward, UpdateId, User, UserId, UserStats, WebUrls,
};

use crate::analytics::MemoryAnalytics;
use crate::api::MockApiService;
use crate::prefs::TestPreferences;
use crate::tasks::TestTasks;

/// Fixed shuffle seed for deterministic recommendation ordering.
pub const SHUFFLE_SEED: [u8; 32] = [7; 32];

/// A minimal successful art project.
pub fn template_project() -> Project {
    Project {
        id: ProjectId(1),
        name: "The Project".to_string(),
        category: ProjectCategory {
            id: CategoryId(1),
            name: "Art".to_string(),
            parent_id: None,
        },
        state: ProjectState::Successful,
        currency: "USD".to_string(),
        creator_id: UserId(42),
        urls: ProjectUrls {
            web: WebUrls {
                project: "https://fundry.example/projects/creator/the-project".to_string(),
                updates: Some(
                    "https://fundry.example/projects/creator/the-project/posts".to_string(),
                ),
            },
        },
        is_in_post_campaign_phase: false,
    }
}

/// A project with a distinct id, for building candidate lists.
pub fn project_with_id(id: u64) -> Project {
    Project {
        id: ProjectId(id),
        name: format!("Project {id}"),
        ..template_project()
    }
}

/// A project filed under a games subcategory.
pub fn games_project() -> Project {
    Project {
        category: ProjectCategory {
            id: CategoryId(34),
            name: "Tabletop Games".to_string(),
            parent_id: Some(CategoryId::GAMES),
        },
        ..template_project()
    }
}

pub fn template_category() -> Category {
    Category {
        id: CategoryId(1),
        name: "Art".to_string(),
        parent: None,
    }
}

pub fn games_category() -> Category {
    Category {
        id: CategoryId::GAMES,
        name: "Games".to_string(),
        parent: None,
    }
}

/// A user with one backing and no newsletter opt-ins.
pub fn template_user() -> User {
    User {
        id: UserId(9),
        name: "Blob".to_string(),
        avatar: Avatar {
            small: "https://fundry.example/avatars/9-small.png".to_string(),
            medium: "https://fundry.example/avatars/9-medium.png".to_string(),
            large: "https://fundry.example/avatars/9-large.png".to_string(),
        },
        newsletters: Newsletters::default(),
        stats: UserStats {
            backed_projects_count: 1,
            created_projects_count: 0,
        },
        opted_out_of_recommendations: Some(false),
    }
}

pub fn template_update() -> ProjectUpdate {
    ProjectUpdate {
        id: UpdateId(42),
        sequence: 7,
        title: "We did it".to_string(),
        project_id: ProjectId(1),
        is_public: true,
    }
}

/// Thanks page data for `project` with a bare pledge.
pub fn thanks_data(project: Project) -> ThanksPageData {
    ThanksPageData {
        project,
        reward: Reward::no_reward(),
        checkout_data: None,
        pledge_total: 1.0,
    }
}

/// Summary data for a collected no-reward pledge by the template user.
pub fn pledge_summary_data() -> PledgeSummaryData {
    PledgeSummaryData {
        backer_id: UserId(9),
        backer_sequence: 1234,
        backing_state: BackingState::Collected,
        bonus_amount: None,
        current_user_is_creator: false,
        is_no_reward: true,
        location_name: None,
        needs_conversion: false,
        omit_us_currency_code: true,
        pledge_amount: 10.0,
        pledged_on: 1_773_532_800, // 2026-03-15T00:00:00Z
        currency_code: "USD".to_string(),
        project_deadline: 1_776_211_200,
        project_state: ProjectState::Successful,
        reward_minimum: 0.0,
        reward_received_hidden: true,
        shipping_amount: None,
        shipping_amount_hidden: true,
    }
}

/// Handles into a built test environment.
pub struct TestContext {
    pub env: Arc<AppEnvironment>,
    pub api: Arc<MockApiService>,
    pub analytics: Arc<MemoryAnalytics>,
    pub prefs: Arc<TestPreferences>,
    pub tasks: Arc<TestTasks>,
}

/// Builder for a deterministic [`AppEnvironment`].
pub struct TestEnvironmentBuilder {
    api: MockApiService,
    prefs: TestPreferences,
    config: AppConfig,
    current_user: Option<User>,
}

impl TestEnvironmentBuilder {
    pub fn new() -> Self {
        Self {
            api: MockApiService::new(),
            prefs: TestPreferences::new(),
            config: AppConfig::default(),
            current_user: Some(template_user()),
        }
    }

    pub fn api(mut self, api: MockApiService) -> Self {
        self.api = api;
        self
    }

    pub fn prefs(mut self, prefs: TestPreferences) -> Self {
        self.prefs = prefs;
        self
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the signed-in user; `None` runs logged out.
    pub fn current_user(mut self, user: Option<User>) -> Self {
        self.current_user = user;
        self
    }

    pub fn build(self) -> TestContext {
        let api = Arc::new(self.api);
        let analytics = Arc::new(MemoryAnalytics::new());
        let prefs = Arc::new(self.prefs);
        let tasks = Arc::new(TestTasks::new());

        let env = AppEnvironment::with_seed(
            Services {
                api: api.clone(),
                analytics: analytics.clone(),
                prefs: prefs.clone(),
                tasks: tasks.clone(),
            },
            self.config,
            SHUFFLE_SEED,
        );
        if let Some(user) = self.current_user {
            env.replace_current_user(user);
        }

        TestContext {
            env,
            api,
            analytics,
            prefs,
            tasks,
        }
    }
}

impl Default for TestEnvironmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
