mod list_hosts;
mod resolve_local_host;

pub use list_hosts::ListHostsUseCase;
pub use resolve_local_host::{LocalAnswer, ResolveLocalHostUseCase};
