pub mod allocations_service;
pub mod certifications_service;
pub mod context;
pub mod dashboard_service;
pub mod employees_service;
pub mod projects_service;
pub mod transitions_service;
pub mod workforce;

pub use allocations_service::AllocationsService;
pub use certifications_service::CertificationsService;
pub use dashboard_service::DashboardService;
pub use employees_service::EmployeesService;
pub use projects_service::ProjectsService;
pub use transitions_service::TransitionsService;
