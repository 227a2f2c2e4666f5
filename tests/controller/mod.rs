mod auth;
mod category;
mod competition;
mod drone;
mod pilot;
mod router;
