use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::Router;
use chainql_chain_ethereum::LoaderFactory;
use chainql_contracts::ContractCallClient;
use slog::{error, info, Logger};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers;
use crate::schema::build_schema;
use crate::ChainQlSchema;
use crate::ServerError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub schema: ChainQlSchema,
    pub loader_factory: LoaderFactory,
    pub call_client: Arc<dyn ContractCallClient>,
    pub logger: Logger,
}

pub struct ChainQlServer {
    loader_factory: LoaderFactory,
    call_client: Arc<dyn ContractCallClient>,
    logger: Logger,
}

pub struct ChainQlServerManager {
    notifier: Arc<Notify>,
    local_addr: SocketAddr,
}

impl ChainQlServer {
    pub fn new(
        loader_factory: LoaderFactory,
        call_client: Arc<dyn ContractCallClient>,
        logger: Logger,
    ) -> Self {
        Self {
            loader_factory,
            call_client,
            logger,
        }
    }

    /// Starts serving GraphQL on `POST /` and GraphiQL on `GET /`.
    ///
    /// Port `0` binds a random free port; see [ChainQlServerManager::local_addr].
    pub async fn start(self, port: u16) -> Result<ChainQlServerManager, ServerError> {
        let Self {
            loader_factory,
            call_client,
            logger,
        } = self;

        let state = AppState {
            schema: build_schema(),
            loader_factory,
            call_client,
            logger: logger.clone(),
        };

        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS, Method::POST])
            .allow_headers(Any);

        let app = Router::new()
            .route(
                "/",
                get(handlers::graphiql).post(handlers::graphql_request),
            )
            .with_state(state)
            .layer(cors_layer);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(ServerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ServerError::Bind)?;

        info!(logger, "Starting GraphQL server at: http://localhost:{}", local_addr.port());

        let notifier = Arc::new(Notify::new());
        let notified = notifier.clone();

        tokio::spawn(async move {
            let shutdown = async move { notified.notified().await };

            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!(logger, "GraphQL server stopped unexpectedly"; "error" => err.to_string());
            }
        });

        Ok(ChainQlServerManager {
            notifier,
            local_addr,
        })
    }
}

impl ChainQlServerManager {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn stop_server(self) {
        self.notifier.notify_one();
    }
}
