pub mod session;
pub mod task_ops;
