// Copyright (c) 2026 QuizSage Shell Project. All rights reserved.

//! QuizSage Shell - interactive client for the QuizSage API
//!
//! Authenticates once at startup, then drops into a read-eval-print loop
//! with persisted history.

use std::env;
use std::process::ExitCode;

use quizsage_client::api::{ApiClient, SessionConfig};
use quizsage_client::shell::{Shell, HELP};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizsage_client=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() >= 2 && matches!(args[1].as_str(), "--help" | "-h" | "help") {
        print_usage();
        return ExitCode::SUCCESS;
    }
    if args.len() >= 2 && matches!(args[1].as_str(), "--version" | "-v" | "version") {
        println!("quizsage-shell {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }
    if args.len() < 4 {
        print_usage();
        return ExitCode::from(1);
    }

    let email = &args[1];
    let password = &args[2];
    let address = &args[3];
    let port = match args.get(4).map(|p| p.parse::<u16>()) {
        None => 443,
        Some(Ok(p)) => p,
        Some(Err(_)) => {
            eprintln!("Invalid port: {}", args[4]);
            return ExitCode::from(1);
        }
    };
    let protocol = args.get(5).cloned().unwrap_or_else(|| "https".to_string());
    let self_signed = args
        .get(6)
        .map(|v| !matches!(v.as_str(), "" | "0" | "false"))
        .unwrap_or(false);

    println!("Connecting against: {}://{}:{}", protocol, address, port);

    let client = match ApiClient::new(SessionConfig {
        address: address.clone(),
        port,
        protocol,
        self_signed,
        session_token: None,
    }) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::from(1);
        }
    };

    if let Err(e) = client.login(email, password).await {
        eprintln!("Login failed: {}", e);
        return ExitCode::from(1);
    }
    if !client.authenticated() {
        // The server accepted the login but issued no session cookie
        eprintln!("Login silently failed");
        return ExitCode::from(1);
    }

    println!(
        "\nWelcome to QuizSage Shell!\n--------------------------\nVersion : {}\n\n{}\n",
        env!("CARGO_PKG_VERSION"),
        HELP
    );

    let mut shell = Shell::new(client);
    match shell.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Shell error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"QuizSage Shell - interactive client for the QuizSage API

USAGE:
    quizsage-shell <email> <password> <address> [port] [protocol] [self_signed]

ARGS:
    email         account email used to authenticate
    password      account password
    address       server address
    port          server port            [default: 443]
    protocol      https or http          [default: https]
    self_signed   tolerate self-signed certificates when set

EXAMPLES:
    quizsage-shell me@example.com secret quizsage.example.com
    quizsage-shell me@example.com secret localhost 3000 http 1

Set RUST_LOG=quizsage_client=debug to trace outgoing endpoints.
"#
    );
}
