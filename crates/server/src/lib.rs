pub mod errors;
pub mod redirect;
pub mod routes;
pub mod startup;

pub use redirect::{redirect, redirect_referer, redirect_to, SeeOther};
pub use startup::run;
