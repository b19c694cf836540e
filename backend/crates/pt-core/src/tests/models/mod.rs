mod difficulty;
mod identity;
mod password_digest;
mod problem;
