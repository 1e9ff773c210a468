pub mod hosts;

pub use hosts::{ListHostsUseCase, LocalAnswer, ResolveLocalHostUseCase};
