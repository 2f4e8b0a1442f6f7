pub mod subdomain;

pub use subdomain::subdomain_middleware;
