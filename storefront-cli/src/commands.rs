//! Subcommand handlers.

use anyhow::{Context, bail};
use rust_decimal::Decimal;
use storefront_core::checkout::{CheckoutOrchestrator, CheckoutOutcome, CheckoutRequest};
use storefront_core::context::CheckoutContext;
use storefront_core::conversion::convert_to;
use storefront_core::events::{NotificationLevel, NotificationReceiver, Notifier, notification_channel};
use storefront_core::money::{Money, format_money};
use storefront_core::payment_method::{PaymentMethodKind, PaymentMethodOption, PaymentMethodSelector};
use storefront_core::pricing::{PricingBreakdown, PricingCalculator, PricingInput};
use storefront_core::remote::RemotePaymentMethods;
use storefront_sdk::auth::AuthContext;
use storefront_sdk::client::{
    AddressClient, BankAccountClient, CardClient, CurrencyClient, PaymentClient,
};
use storefront_sdk::objects::{Currency, ProtectionMode};

use crate::config::{LoadedConfig, get_auth_token};

const NEW_CARD: &str = "new-card";

pub struct CheckoutArgs {
    pub product_id: String,
    pub offer_id: Option<String>,
    pub method: Option<String>,
    pub pricing: PricingInput,
}

pub fn quote(config: &LoadedConfig, input: &PricingInput) -> anyhow::Result<()> {
    let calculator = PricingCalculator::new(config.checkout.fees);
    let (escrow, standard) = calculator.compare_protection(input)?;
    let (chosen, other) = if input.use_escrow {
        (&escrow, &standard)
    } else {
        (&standard, &escrow)
    };

    print_breakdown(chosen, input.product_price);
    println!(
        "({} protection would total {})",
        protection_label(other.protection_mode),
        format_money(other.total, &other.currency)
    );
    Ok(())
}

pub async fn methods(config: &LoadedConfig) -> anyhow::Result<()> {
    let auth = get_auth_token()?;
    let context = load_context(config, &auth).await?;

    if context.methods.is_empty() {
        println!("No saved payment methods. Use `--method {NEW_CARD}` at checkout.");
    }
    for option in &context.methods {
        let marker = if option.is_default { " (default)" } else { "" };
        let key = format!("{}:{}", kind_prefix(option.kind), option.id);
        println!("{:<20} {}{}", key, option.label, marker);
    }
    match &context.default_address {
        Some(address) => println!(
            "Ships to: {}, {}, {} {}",
            address.full_name, address.street1, address.city, address.country
        ),
        None => println!("No default shipping address."),
    }
    Ok(())
}

pub async fn convert(
    config: &LoadedConfig,
    amount: Decimal,
    from: Currency,
    to: Currency,
) -> anyhow::Result<()> {
    let auth = get_auth_token().unwrap_or_else(|_| AuthContext::anonymous());
    let client = CurrencyClient::new(config.base_url.clone(), auth);

    let money = Money::new(amount, from)?;
    let converted = convert_to(&client, &money, &to).await?;
    println!(
        "{} = {}",
        format_money(money.amount(), money.currency()),
        format_money(converted, &to)
    );
    Ok(())
}

pub async fn checkout(config: &LoadedConfig, args: CheckoutArgs) -> anyhow::Result<()> {
    let auth = get_auth_token()?;
    let context = load_context(config, &auth).await?;

    let mut selector = context.selector();
    apply_method(&mut selector, args.method.as_deref())?;

    let request = CheckoutRequest {
        product_id: args.product_id,
        offer_id: args.offer_id,
        pricing: args.pricing,
        shipping_address: context.default_address.clone(),
        selection: selector.selection().cloned(),
        available_methods: context.methods.clone(),
    };

    let (tx, mut rx) = notification_channel();
    let payments = PaymentClient::new(config.base_url.clone(), auth);
    let orchestrator =
        CheckoutOrchestrator::new(payments, config.checkout.clone()).with_notifier(Notifier::new(tx));

    if let Ok(breakdown) = orchestrator.quote(&request.pricing) {
        print_breakdown(&breakdown, request.pricing.product_price);
    }

    let result = match orchestrator.begin(request) {
        Ok(attempt) => {
            tracing::info!(attempt_id = %attempt.attempt_id(), "submitting checkout");
            attempt.run().await
        }
        Err(failure) => Err(failure),
    };
    drain_notifications(&mut rx);

    match result? {
        CheckoutOutcome::Completed {
            payment_id,
            transaction_id,
        } => {
            println!("Payment {payment_id} completed (transaction {transaction_id}).");
        }
        CheckoutOutcome::Redirect {
            payment_id,
            payment_url,
        } => {
            println!("Payment {payment_id} created. Continue at:");
            println!("{payment_url}");
        }
        CheckoutOutcome::AwaitingConfirmation(pending) => {
            println!(
                "Payment {} awaits card confirmation.",
                pending.payment_id
            );
            println!("client_secret: {}", pending.client_secret);
            if let Some(key) = &pending.publishable_key {
                println!("publishable_key: {key}");
            }
        }
    }
    Ok(())
}

async fn load_context(config: &LoadedConfig, auth: &AuthContext) -> anyhow::Result<CheckoutContext> {
    let methods = RemotePaymentMethods::new(
        CardClient::new(config.base_url.clone(), auth.clone()),
        BankAccountClient::new(config.base_url.clone(), auth.clone()),
    );
    let addresses = AddressClient::new(config.base_url.clone(), auth.clone());
    CheckoutContext::load(&methods, &addresses)
        .await
        .context("failed to load checkout context")
}

fn apply_method(selector: &mut PaymentMethodSelector, method: Option<&str>) -> anyhow::Result<()> {
    match method {
        None => {}
        Some(NEW_CARD) => {
            selector.select_new_card();
        }
        Some(spec) => {
            let option = find_method(selector.methods(), spec)?;
            selector.select(&option);
        }
    }
    Ok(())
}

/// Look up `id`, `card:id` or `bank:id`. A bare id shared by a card and a
/// bank account is rejected.
fn find_method(methods: &[PaymentMethodOption], spec: &str) -> anyhow::Result<PaymentMethodOption> {
    let (kind, id) = match spec.split_once(':') {
        Some(("card", id)) => (Some(PaymentMethodKind::SavedCard), id),
        Some(("bank", id)) => (Some(PaymentMethodKind::BankAccount), id),
        _ => (None, spec),
    };

    let mut matches = methods
        .iter()
        .filter(|o| o.id == id && kind.is_none_or(|kind| o.kind == kind));
    match (matches.next(), matches.next()) {
        (Some(option), None) => Ok(option.clone()),
        (None, _) => bail!("no active card or bank account with id {id}"),
        (Some(_), Some(_)) => {
            bail!("id {id} names both a card and a bank account; use card:{id} or bank:{id}")
        }
    }
}

fn kind_prefix(kind: PaymentMethodKind) -> &'static str {
    match kind {
        PaymentMethodKind::SavedCard => "card",
        PaymentMethodKind::BankAccount => "bank",
    }
}

fn drain_notifications(rx: &mut NotificationReceiver) {
    while let Ok(notification) = rx.try_recv() {
        match notification.level {
            NotificationLevel::Error => tracing::error!(
                code = notification.code.unwrap_or_default(),
                "{}",
                notification.message
            ),
            NotificationLevel::Success | NotificationLevel::Info => {
                tracing::info!("{}", notification.message)
            }
        }
    }
}

fn print_breakdown(breakdown: &PricingBreakdown, list_price: Decimal) {
    let currency = &breakdown.currency;
    let price_label = if breakdown.offer_applied(list_price) {
        "Offer price"
    } else {
        "Product price"
    };
    println!("{:<20} {:>14}", price_label, format_money(breakdown.product_price, currency));
    println!(
        "{:<20} {:>14}",
        format!("{} protection", protection_label(breakdown.protection_mode)),
        format_money(breakdown.protection_fee, currency)
    );
    println!("{:<20} {:>14}", "Shipping", format_money(breakdown.shipping_cost, currency));
    println!("{:<20} {:>14}", "Sales tax", format_money(breakdown.sales_tax, currency));
    println!("{:<20} {:>14}", "Total", format_money(breakdown.total, currency));
}

fn protection_label(mode: ProtectionMode) -> &'static str {
    match mode {
        ProtectionMode::Escrow => "Escrow",
        ProtectionMode::Standard => "Standard",
    }
}
