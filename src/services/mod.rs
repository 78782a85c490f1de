// Business logic services

pub mod ai_client;
pub mod analysis;
pub mod appointment_service;
pub mod article_service;
pub mod doctor_service;
pub mod health_metrics;
pub mod quiz_service;
pub mod user_service;

pub use ai_client::{ChatClient, ChatParams};
pub use analysis::HealthAnalysisService;
pub use appointment_service::AppointmentService;
pub use article_service::ArticleService;
pub use doctor_service::DoctorService;
pub use health_metrics::calculate_health_metrics;
pub use quiz_service::QuizService;
pub use user_service::UserService;
