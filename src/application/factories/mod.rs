mod formatter_factory;
mod manager_factory;
mod presenter_factory;

pub use formatter_factory::FormatterFactory;
pub use manager_factory::ManagerFactory;
pub use presenter_factory::{PresenterFactory, PresenterType};
