#[macro_use]
extern crate log;

use std::{fs, path::Path, process};

use anyhow::anyhow;
use bb_application::{error::AppError, prelude as flows};
use bb_core::{usecases, util::validate};
use bb_db_sqlite::{run_embedded_database_migrations, Connections};
use clap::Parser;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use time::OffsetDateTime;

use self::{
    adapters::json::{self, from_json, to_json},
    cli::{Cli, Command},
    config::Config,
};

mod adapters;
mod cli;
mod config;

type Result<T> = std::result::Result<T, AppError>;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            error!("{err}");
            match serde_json::to_string_pretty(&to_json::error(&err)) {
                Ok(output) => eprintln!("{output}"),
                Err(_) => eprintln!("{err}"),
            }
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let Cli {
        config,
        db_url,
        command,
    } = cli;
    let mut cfg = Config::try_load_from_file_or_default(config)?;
    if let Some(db_url) = db_url {
        cfg.db.conn_sqlite = db_url;
    }
    info!("Connecting to SQLite database {}", cfg.db.conn_sqlite);
    let connections = Connections::init(&cfg.db.conn_sqlite, u32::from(cfg.db.conn_pool_size))?;
    let is_migrate = matches!(command, Command::Migrate);
    if cfg.db.run_migrations || is_migrate {
        run_embedded_database_migrations(connections.exclusive()?)?;
    }
    if is_migrate {
        return output(json!({ "migrated": true }));
    }
    execute(&connections, command)
}

fn execute(connections: &Connections, command: Command) -> Result<String> {
    match command {
        Command::Migrate => output(json!({ "migrated": true })),
        Command::Import { file } => {
            let seed = from_json::seed(read_json(&file)?);
            let summary = flows::import_seed(connections, seed)?;
            output(to_json::import_summary(summary))
        }
        Command::CreateUser { file } => {
            let new_user = from_json::new_user(read_json(&file)?);
            let user = flows::create_user(connections, new_user)?;
            output(json::User::from(user))
        }
        Command::Profile { user } => {
            let profile = flows::public_profile(connections, &user)?;
            output(json::PublicProfile::from(profile))
        }
        Command::DeleteUser { user } => {
            flows::delete_user(connections, &user)?;
            output(json!({ "deleted": user }))
        }
        Command::CreateRoute {
            owner,
            file,
            inexperienced,
        } => {
            if inexperienced {
                let new_route = from_json::new_inexperienced_route(read_json(&file)?);
                let route = flows::create_inexperienced_route(connections, &owner, new_route)?;
                output(json::InexperiencedRoute::from(route))
            } else {
                let new_route = from_json::new_experienced_route(read_json(&file)?);
                let route = flows::create_experienced_route(connections, &owner, new_route)?;
                output(json::ExperiencedRoute::from(route))
            }
        }
        Command::Routes {
            owner,
            inexperienced,
        } => {
            if inexperienced {
                let routes = flows::inexperienced_routes_of_owner(connections, &owner)?;
                output(
                    routes
                        .into_iter()
                        .map(json::InexperiencedRoute::from)
                        .collect::<Vec<_>>(),
                )
            } else {
                let routes = flows::experienced_routes_of_owner(connections, &owner)?;
                output(
                    routes
                        .into_iter()
                        .map(json::ExperiencedRoute::from)
                        .collect::<Vec<_>>(),
                )
            }
        }
        Command::DeleteRoute {
            owner,
            route,
            inexperienced,
        } => {
            let canceled = if inexperienced {
                flows::delete_inexperienced_route(connections, &owner, &route)?
            } else {
                flows::delete_experienced_route(connections, &owner, &route)?
            };
            output(json!({ "deleted": route, "canceledRequests": canceled }))
        }
        Command::Match {
            requester,
            query,
            arrival_override,
        } => {
            let query = from_json::match_query(read_json(&query)?);
            let arrival_override = parse_arrival_override(arrival_override)?;
            let matches = flows::match_routes(connections, &requester, query, arrival_override)?;
            output(
                matches
                    .into_iter()
                    .map(to_json::route_match)
                    .collect::<Vec<_>>(),
            )
        }
        Command::MatchRoute {
            requester,
            route,
            arrival_override,
        } => {
            let arrival_override = parse_arrival_override(arrival_override)?;
            let matches =
                flows::match_inexperienced_route(connections, &requester, &route, arrival_override)?;
            output(
                matches
                    .into_iter()
                    .map(to_json::route_match)
                    .collect::<Vec<_>>(),
            )
        }
        Command::Request { owner, file } => {
            let new_request = from_json::new_buddy_request(read_json(&file)?);
            let request = flows::create_buddy_request(connections, &owner, new_request)?;
            output(json::BuddyRequest::from(request))
        }
        Command::Requests { user } => {
            let requests = flows::buddy_requests_of_user(connections, &user)?;
            output(
                requests
                    .into_iter()
                    .map(json::BuddyRequest::from)
                    .collect::<Vec<_>>(),
            )
        }
        Command::SetStatus {
            caller,
            request,
            status,
            reason,
        } => {
            let status = validate::status(&status).map_err(usecases::Error::from)?;
            let request =
                flows::change_buddy_request_status(connections, &caller, &request, status, reason)?;
            output(json::BuddyRequest::from(request))
        }
        Command::UpdateRequest {
            caller,
            request,
            file,
        } => {
            let patch = from_json::buddy_request_patch(read_json(&file)?);
            let request = flows::update_buddy_request(connections, &caller, &request, patch)?;
            output(json::BuddyRequest::from(request))
        }
        Command::Review {
            reviewer,
            request,
            score,
        } => {
            let request = flows::review_buddy_request(connections, &reviewer, &request, score)?;
            output(json::BuddyRequest::from(request))
        }
    }
}

fn parse_arrival_override(arrival: Option<String>) -> Result<Option<OffsetDateTime>> {
    arrival
        .map(|s| validate::date_time(&s, "arrivalOverride").map_err(usecases::Error::from))
        .transpose()
        .map_err(AppError::from)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let input = fs::read_to_string(path)?;
    serde_json::from_str(&input)
        .map_err(|err| anyhow!("Invalid JSON in {}: {err}", path.display()).into())
}

fn output<T: Serialize>(value: T) -> Result<String> {
    serde_json::to_string_pretty(&value).map_err(|err| anyhow::Error::from(err).into())
}
