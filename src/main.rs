// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Blue Bank International

use std::{env, net::SocketAddr, sync::Arc};

use tracing_subscriber::EnvFilter;

use bluebank_server::{
    api::router,
    auth::HttpIdentityGateway,
    config,
    notify::EmailNotificationSender,
    providers::{
        KycProvider, Mailer, MailerSendClient, SumsubClient, UnconfiguredKyc, UnconfiguredMailer,
    },
    state::AppState,
    store::rest::RestStore,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

fn mailer_from_env() -> Arc<dyn Mailer> {
    match MailerSendClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::warn!(error = %e, "email delivery disabled");
            Arc::new(UnconfiguredMailer {
                missing: config::MAILER_API_KEY_ENV,
            })
        }
    }
}

fn kyc_from_env() -> Arc<dyn KycProvider> {
    match SumsubClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::warn!(error = %e, "kyc proxy disabled");
            Arc::new(UnconfiguredKyc {
                missing: config::KYC_APP_TOKEN_ENV,
            })
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    let gateway = HttpIdentityGateway::from_env().expect("identity gateway configuration");
    let store = Arc::new(RestStore::from_env().expect("backend store configuration"));

    let mailer = mailer_from_env();
    let operator_email = env::var(config::OPERATOR_EMAIL_ENV).unwrap_or_else(|_| {
        tracing::warn!("{} not set, recharge notices will fail", config::OPERATOR_EMAIL_ENV);
        String::new()
    });
    let notifier = Arc::new(EmailNotificationSender::new(
        mailer.clone(),
        store.clone(),
        operator_email,
    ));

    let state = AppState {
        gateway: Arc::new(gateway),
        recharges: store.clone(),
        beneficiaries: store.clone(),
        events: store.clone(),
        profiles: store,
        notifier,
        mailer,
        kyc: kyc_from_env(),
    };
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!(%addr, "Blue Bank edge API listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .expect("HTTP server failed");
}
