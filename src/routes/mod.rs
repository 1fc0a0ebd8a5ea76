pub mod evaluations;

pub mod rankings;

pub mod rubrics;

pub mod schedules;

pub mod student_evaluations;

pub mod frontend;

pub use evaluations::configure_evaluations_routes;
pub use frontend::configure_frontend_routes;
pub use rankings::configure_rankings_routes;
pub use rubrics::configure_rubrics_routes;
pub use schedules::configure_schedules_routes;
pub use student_evaluations::configure_student_evaluations_routes;
