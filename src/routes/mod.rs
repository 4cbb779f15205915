mod error;
mod form;
mod health_check;
mod home;
mod subscriber;
mod unsubscriber;

pub use error::NewsletterError;
pub use health_check::check_health;
pub use home::home;
pub use subscriber::subscriber;
pub use unsubscriber::unsubscriber;
