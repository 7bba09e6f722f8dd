//! # Checkout Command
//!
//! `malha checkout` places a PIX order for a cart file and prints the
//! confirmation. With `--orders` the order is also appended to an order log,
//! which `malha orders` reads back as a customer's history.
//!
//! ```text
//! malha checkout --orders log.json ...   ──► log.json  [#1, #2, ...]
//!                                                 │
//! malha orders --orders log.json --user-id ◄──────┘  newest first
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use super::{load_cart, load_orders, open_service, save_orders, LocalCheckout};
use crate::cli::{CheckoutArgs, OrdersArgs};
use crate::config::StorefrontConfig;
use crate::services::{camisas, CheckoutService};
use malha_core::validation::format_cep;
use malha_core::{
    CheckoutForm, CustomerInfo, DeliveryAddress, Order, OrderStatus, PaymentMethod,
};
use malha_store::{InMemoryStore, StaticAddressBook};

/// Runs `malha checkout` and returns the output.
pub async fn run(args: &CheckoutArgs, config: StorefrontConfig) -> anyhow::Result<String> {
    debug!(cart = %args.source.cart.display(), user_id = ?args.user_id, "checkout command");

    let mut log = match &args.orders {
        Some(path) => load_orders(path)?,
        None => Vec::new(),
    };
    let service = open_service(
        &args.source.catalog,
        args.addresses.as_deref(),
        log.clone(),
        config,
    )?;
    let requests = load_cart(&args.source)?;
    let cart = service.build_cart(&requests).await?;

    let order = service
        .place_order(args.user_id.as_deref(), &cart, form(args))
        .await?;

    if let Some(path) = &args.orders {
        log.push(order.clone());
        save_orders(path, &log)?;
        info!(order_id = order.id, log = %path.display(), "Order logged");
    }

    if args.source.json {
        return Ok(serde_json::to_string_pretty(&order)?);
    }
    Ok(render(&order, service.config()))
}

fn form(args: &CheckoutArgs) -> CheckoutForm {
    CheckoutForm {
        customer: CustomerInfo {
            name: args.name.clone(),
            email: args.email.clone(),
            phone: args.phone.clone(),
        },
        address: DeliveryAddress {
            cep: args.cep.clone(),
            street: args.street.clone(),
            number: args.number.clone(),
            complement: args.complement.clone(),
            neighborhood: args.neighborhood.clone(),
            city: args.city.clone(),
            state: args.state.clone(),
        },
        payment_method: PaymentMethod::Pix,
    }
}

/// Runs `malha orders` and returns the output.
pub async fn run_history(args: &OrdersArgs, config: StorefrontConfig) -> anyhow::Result<String> {
    debug!(log = %args.orders.display(), user_id = %args.user_id, "orders command");

    let store = InMemoryStore::empty().with_orders(load_orders(&args.orders)?);
    let service: LocalCheckout =
        CheckoutService::new(Arc::new(store), Arc::new(StaticAddressBook::new()), config);
    let orders = service.order_history(&args.user_id).await?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&orders)?);
    }
    Ok(render_history(&orders, service.config()))
}

/// One row per order, newest first.
pub fn render_history(orders: &[Order], config: &StorefrontConfig) -> String {
    if orders.is_empty() {
        return "Nenhum pedido encontrado.".to_string();
    }
    orders
        .iter()
        .map(|order| {
            format!(
                "  #{:<4} {}  {:<10} {:>12}  {}",
                order.id,
                order.created_at.format("%d/%m/%Y"),
                camisas(order.total_quantity()),
                config.format_currency(order.draft.total_amount),
                status_label(order.draft.status)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::PendingPayment => "aguardando pagamento",
        OrderStatus::Pending => "em preparação",
        OrderStatus::Shipped => "enviado",
        OrderStatus::Delivered => "entregue",
        OrderStatus::Cancelled => "cancelado",
    }
}

/// Order confirmation text.
pub fn render(order: &Order, config: &StorefrontConfig) -> String {
    let draft = &order.draft;
    let address = &draft.delivery_address;

    let mut out = vec![
        format!("Pedido #{} recebido!", order.id),
        format!("  Cliente: {} <{}>", draft.customer.name, draft.customer.email),
        format!(
            "  Entrega: {}, {}{} - {}, {}/{} - CEP {}",
            address.street,
            address.number,
            if address.complement.is_empty() {
                String::new()
            } else {
                format!(" ({})", address.complement)
            },
            address.neighborhood,
            address.city,
            address.state,
            format_cep(&address.cep)
        ),
    ];
    for item in &draft.items {
        out.push(format!(
            "  {}x {} ({}) {}",
            item.quantity,
            item.name,
            item.size,
            config.format_currency(item.unit_price * item.quantity)
        ));
    }
    if draft.discount.is_positive() {
        out.push(format!("  Desconto: -{}", config.format_currency(draft.discount)));
    }
    out.push(format!("  Total: {}", config.format_currency(draft.total_amount)));
    out.push("  Pagamento: PIX (aguardando pagamento)".to_string());
    out.join("\n")
}
