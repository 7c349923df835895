use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bikebuddy", version, about = "Find a buddy for your bike commute")]
pub struct Cli {
    /// Configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path of the SQLite database, overrides the configuration
    #[arg(long)]
    pub db_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply all pending database migrations
    Migrate,

    /// Import users and routes from a JSON seed file
    Import { file: PathBuf },

    /// Register a new user (JSON file)
    CreateUser { file: PathBuf },

    /// Show the public profile of a user
    Profile {
        #[arg(long)]
        user: String,
    },

    /// Delete a user including all routes and cancel their requests
    DeleteUser {
        #[arg(long)]
        user: String,
    },

    /// Create a route (JSON file)
    CreateRoute {
        #[arg(long)]
        owner: String,
        file: PathBuf,
        /// The route describes a planned trip of a rider looking for a buddy
        #[arg(long, default_value_t = false)]
        inexperienced: bool,
    },

    /// List the routes of a user
    Routes {
        #[arg(long)]
        owner: String,
        #[arg(long, default_value_t = false)]
        inexperienced: bool,
    },

    /// Delete a route and cancel all active requests for it
    DeleteRoute {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        route: String,
        #[arg(long, default_value_t = false)]
        inexperienced: bool,
    },

    /// Search experienced routes for an ad-hoc trip (JSON file)
    Match {
        #[arg(long)]
        requester: String,
        #[arg(long)]
        query: PathBuf,
        /// Use this arrival (RFC 3339) instead of the one of the query
        #[arg(long)]
        arrival_override: Option<String>,
    },

    /// Search experienced routes for a stored inexperienced route
    MatchRoute {
        #[arg(long)]
        requester: String,
        #[arg(long)]
        route: String,
        #[arg(long)]
        arrival_override: Option<String>,
    },

    /// Ask an experienced rider to buddy up (JSON file)
    Request {
        #[arg(long)]
        owner: String,
        file: PathBuf,
    },

    /// List all requests the user takes part in
    Requests {
        #[arg(long)]
        user: String,
    },

    /// Accept, reject or cancel a request
    SetStatus {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        request: String,
        #[arg(long)]
        status: String,
        #[arg(long)]
        reason: Option<String>,
    },

    /// Change the meeting details of a request (JSON file)
    UpdateRequest {
        #[arg(long)]
        caller: String,
        #[arg(long)]
        request: String,
        file: PathBuf,
    },

    /// Rate the ride of a request from 1 to 5
    Review {
        #[arg(long)]
        reviewer: String,
        #[arg(long)]
        request: String,
        #[arg(long)]
        score: i64,
    },
}
