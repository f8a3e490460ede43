use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledgerly::{
  adapters::http::{
    configure_credit_note_routes, configure_customer_routes, configure_dashboard_routes,
    configure_invoice_routes, configure_payment_routes, configure_product_routes,
  },
  application::billing::{
    ChangeInvoiceStatusUseCase, CreateCustomerUseCase, CreateInvoiceUseCase, CreateProductUseCase,
    DeleteCustomerUseCase, DeleteInvoiceUseCase, DeleteProductUseCase, GetCustomerUseCase,
    GetDashboardUseCase, GetInvoiceDetailsUseCase, GetProductUseCase, ListCustomersUseCase,
    ListInvoicesUseCase, ListProductsUseCase, RecordReminderUseCase, UpdateCustomerUseCase,
    UpdateInvoiceUseCase, UpdateProductUseCase,
  },
  application::payments::{
    AllocatePaymentUseCase, ApplyCreditNoteUseCase, ChangePaymentStatusUseCase,
    CreateCreditNoteUseCase, GetPaymentDetailsUseCase, ListCreditNotesUseCase,
    ListPaymentsUseCase, RecordPaymentUseCase, RefundCreditNoteUseCase,
  },
  domain::billing::{BillingService, BillingServiceDependencies},
  domain::payments::{PaymentService, PaymentServiceDependencies},
  infrastructure::{
    config::Config,
    persistence::postgres::{
      PostgresCreditNoteRepository, PostgresCustomerRepository, PostgresDunningReminderRepository,
      PostgresInvoiceRepository, PostgresPaymentAllocationRepository, PostgresPaymentRepository,
      PostgresProductRepository, PostgresReportingRepository,
    },
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ledgerly=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Ledgerly application");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Create repositories
  let customer_repo = Arc::new(PostgresCustomerRepository::new(db_pool.clone()));
  let product_repo = Arc::new(PostgresProductRepository::new(db_pool.clone()));
  let invoice_repo = Arc::new(PostgresInvoiceRepository::new(db_pool.clone()));
  let reminder_repo = Arc::new(PostgresDunningReminderRepository::new(db_pool.clone()));
  let payment_repo = Arc::new(PostgresPaymentRepository::new(db_pool.clone()));
  let allocation_repo = Arc::new(PostgresPaymentAllocationRepository::new(db_pool.clone()));
  let credit_note_repo = Arc::new(PostgresCreditNoteRepository::new(db_pool.clone()));
  let reporting_repo = Arc::new(PostgresReportingRepository::new(db_pool.clone()));

  // Create domain services
  let billing_service = Arc::new(BillingService::new(BillingServiceDependencies {
    customer_repo: customer_repo.clone(),
    product_repo: product_repo.clone(),
    invoice_repo: invoice_repo.clone(),
    reminder_repo: reminder_repo.clone(),
  }));

  let payment_service = Arc::new(PaymentService::new(PaymentServiceDependencies {
    payment_repo: payment_repo.clone(),
    allocation_repo: allocation_repo.clone(),
    credit_note_repo: credit_note_repo.clone(),
    invoice_repo: invoice_repo.clone(),
    customer_repo: customer_repo.clone(),
  }));

  // Create customer use cases
  let create_customer_use_case = Arc::new(CreateCustomerUseCase::new(billing_service.clone()));
  let list_customers_use_case = Arc::new(ListCustomersUseCase::new(billing_service.clone()));
  let get_customer_use_case = Arc::new(GetCustomerUseCase::new(billing_service.clone()));
  let update_customer_use_case = Arc::new(UpdateCustomerUseCase::new(billing_service.clone()));
  let delete_customer_use_case = Arc::new(DeleteCustomerUseCase::new(billing_service.clone()));

  // Create product use cases
  let create_product_use_case = Arc::new(CreateProductUseCase::new(billing_service.clone()));
  let list_products_use_case = Arc::new(ListProductsUseCase::new(billing_service.clone()));
  let get_product_use_case = Arc::new(GetProductUseCase::new(billing_service.clone()));
  let update_product_use_case = Arc::new(UpdateProductUseCase::new(billing_service.clone()));
  let delete_product_use_case = Arc::new(DeleteProductUseCase::new(billing_service.clone()));

  // Create invoice use cases
  let create_invoice_use_case = Arc::new(CreateInvoiceUseCase::new(billing_service.clone()));
  let list_invoices_use_case = Arc::new(ListInvoicesUseCase::new(billing_service.clone()));
  let get_invoice_details_use_case =
    Arc::new(GetInvoiceDetailsUseCase::new(billing_service.clone()));
  let update_invoice_use_case = Arc::new(UpdateInvoiceUseCase::new(billing_service.clone()));
  let delete_invoice_use_case = Arc::new(DeleteInvoiceUseCase::new(billing_service.clone()));
  let change_invoice_status_use_case =
    Arc::new(ChangeInvoiceStatusUseCase::new(billing_service.clone()));
  let record_reminder_use_case = Arc::new(RecordReminderUseCase::new(billing_service.clone()));

  // Create payment use cases
  let record_payment_use_case = Arc::new(RecordPaymentUseCase::new(payment_service.clone()));
  let list_payments_use_case = Arc::new(ListPaymentsUseCase::new(payment_service.clone()));
  let get_payment_details_use_case =
    Arc::new(GetPaymentDetailsUseCase::new(payment_service.clone()));
  let change_payment_status_use_case =
    Arc::new(ChangePaymentStatusUseCase::new(payment_service.clone()));
  let allocate_payment_use_case = Arc::new(AllocatePaymentUseCase::new(payment_service.clone()));

  // Create credit note use cases
  let create_credit_note_use_case = Arc::new(CreateCreditNoteUseCase::new(payment_service.clone()));
  let list_credit_notes_use_case = Arc::new(ListCreditNotesUseCase::new(payment_service.clone()));
  let apply_credit_note_use_case = Arc::new(ApplyCreditNoteUseCase::new(payment_service.clone()));
  let refund_credit_note_use_case =
    Arc::new(RefundCreditNoteUseCase::new(payment_service.clone()));

  // Create dashboard use case
  let get_dashboard_use_case = Arc::new(GetDashboardUseCase::new(
    reporting_repo.clone(),
    config.dashboard.recent_activity_limit,
  ));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add logging middleware
      .wrap(Logger::default())
      // Configure customer API routes
      .service(web::scope("/api/v1/customers").configure(|cfg| {
        configure_customer_routes(
          cfg,
          create_customer_use_case.clone(),
          list_customers_use_case.clone(),
          get_customer_use_case.clone(),
          update_customer_use_case.clone(),
          delete_customer_use_case.clone(),
        )
      }))
      // Configure product API routes
      .service(web::scope("/api/v1/products").configure(|cfg| {
        configure_product_routes(
          cfg,
          create_product_use_case.clone(),
          list_products_use_case.clone(),
          get_product_use_case.clone(),
          update_product_use_case.clone(),
          delete_product_use_case.clone(),
        )
      }))
      // Configure invoice API routes
      .service(web::scope("/api/v1/invoices").configure(|cfg| {
        configure_invoice_routes(
          cfg,
          create_invoice_use_case.clone(),
          list_invoices_use_case.clone(),
          get_invoice_details_use_case.clone(),
          update_invoice_use_case.clone(),
          delete_invoice_use_case.clone(),
          change_invoice_status_use_case.clone(),
          record_reminder_use_case.clone(),
        )
      }))
      // Configure payment API routes
      .service(web::scope("/api/v1/payments").configure(|cfg| {
        configure_payment_routes(
          cfg,
          record_payment_use_case.clone(),
          list_payments_use_case.clone(),
          get_payment_details_use_case.clone(),
          change_payment_status_use_case.clone(),
          allocate_payment_use_case.clone(),
        )
      }))
      // Configure credit note API routes
      .service(web::scope("/api/v1/credit-notes").configure(|cfg| {
        configure_credit_note_routes(
          cfg,
          create_credit_note_use_case.clone(),
          list_credit_notes_use_case.clone(),
          apply_credit_note_use_case.clone(),
          refund_credit_note_use_case.clone(),
        )
      }))
      // Configure dashboard API routes
      .service(web::scope("/api/v1/dashboard").configure(|cfg| {
        configure_dashboard_routes(cfg, get_dashboard_use_case.clone())
      }))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
