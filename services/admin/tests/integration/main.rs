mod helpers;

mod auth_test;
mod gate_test;
mod guardian_test;
mod role_test;
mod school_test;
