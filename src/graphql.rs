//! The GraphQL API, an alternative to the REST routes over the same [Ledger](crate::transaction::Ledger).
//!
//! Queries return GraphQL errors on failure. Mutations report expected
//! failures (bad input, unknown ID) in their payload as `success: false` with
//! the same message the REST API sends, and only unexpected failures become
//! GraphQL errors.

use async_graphql::{
    Context, EmptySubscription, InputObject, Object, Schema, SimpleObject,
    http::GraphiQLSource,
};
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState, Error,
    app_state::LedgerState,
    endpoints,
    not_found::not_found_response,
    transaction::{
        AmountInput, Summary, TextInput, Transaction, TransactionFilter, TransactionId,
        TransactionInput,
    },
};

/// The schema served at [endpoints::GRAPHQL].
pub type FinanceSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with access to the ledger in `state`.
pub fn build_schema(state: LedgerState) -> FinanceSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}

/// Serves the GraphiQL IDE in debug mode, otherwise responds with 404.
pub async fn get_graphiql_page(State(state): State<AppState>) -> Response {
    if state.debug {
        Html(GraphiQLSource::build().endpoint(endpoints::GRAPHQL).finish()).into_response()
    } else {
        not_found_response()
    }
}

/// A transaction as exposed over GraphQL.
pub struct TransactionObject(Transaction);

#[Object(name = "TransactionType")]
impl TransactionObject {
    async fn id(&self) -> TransactionId {
        self.0.id
    }

    #[graphql(name = "type")]
    async fn kind(&self) -> &str {
        self.0.kind.as_str()
    }

    async fn amount(&self) -> f64 {
        self.0.amount
    }

    async fn category(&self) -> Option<&str> {
        self.0.category.as_ref().map(|category| category.as_str())
    }

    async fn date(&self) -> &str {
        &self.0.date
    }

    async fn created_at(&self) -> Option<&str> {
        Some(self.0.created_at.as_str()).filter(|created_at| !created_at.is_empty())
    }
}

#[derive(SimpleObject)]
#[graphql(name = "SummaryType")]
struct SummaryObject {
    total_income: f64,
    total_expenses: f64,
    balance: f64,
}

impl From<Summary> for SummaryObject {
    fn from(summary: Summary) -> Self {
        Self {
            total_income: summary.total_income,
            total_expenses: summary.total_expenses,
            balance: summary.balance,
        }
    }
}

/// Optional filters for the `transactions` query.
#[derive(InputObject, Default)]
#[graphql(name = "TransactionFilters")]
struct TransactionFilters {
    #[graphql(name = "type")]
    kind: Option<String>,
    month: Option<i32>,
    year: Option<i32>,
}

/// The fields for creating or updating a transaction.
#[derive(InputObject)]
#[graphql(name = "TransactionInput")]
struct TransactionInputObject {
    #[graphql(name = "type")]
    kind: String,
    amount: f64,
    category: Option<String>,
    date: String,
}

impl From<TransactionInputObject> for TransactionInput {
    fn from(input: TransactionInputObject) -> Self {
        Self {
            kind: Some(TextInput::from(input.kind)),
            amount: Some(AmountInput::Number(input.amount)),
            category: input.category.map(TextInput::from),
            date: Some(input.date),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(name = "CreateTransaction")]
struct CreateTransactionPayload {
    transaction: Option<TransactionObject>,
    success: bool,
    error: Option<String>,
}

#[derive(SimpleObject)]
#[graphql(name = "UpdateTransaction")]
struct UpdateTransactionPayload {
    transaction: Option<TransactionObject>,
    success: bool,
    error: Option<String>,
}

#[derive(SimpleObject)]
#[graphql(name = "DeleteTransaction")]
struct DeleteTransactionPayload {
    success: bool,
    error: Option<String>,
}

/// The root of all GraphQL queries.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All transactions matching `filters`, newest first.
    async fn transactions(
        &self,
        ctx: &Context<'_>,
        filters: Option<TransactionFilters>,
    ) -> async_graphql::Result<Vec<TransactionObject>> {
        let filter = into_filter(filters.unwrap_or_default())?;

        ctx.data::<LedgerState>()?
            .with_ledger(|ledger| ledger.list(&filter))
            .map(|transactions| transactions.into_iter().map(TransactionObject).collect())
            .map_err(into_graphql_error)
    }

    /// The transaction with `id`, or null.
    async fn transaction(
        &self,
        ctx: &Context<'_>,
        id: TransactionId,
    ) -> async_graphql::Result<Option<TransactionObject>> {
        ctx.data::<LedgerState>()?
            .with_ledger(|ledger| Ok(ledger.get(id)))
            .map(|transaction| transaction.map(TransactionObject))
            .map_err(into_graphql_error)
    }

    /// Income, expense and balance totals, optionally for a year or a month of a year.
    async fn summary(
        &self,
        ctx: &Context<'_>,
        month: Option<i32>,
        year: Option<i32>,
    ) -> async_graphql::Result<SummaryObject> {
        let filter = into_filter(TransactionFilters {
            kind: None,
            month,
            year,
        })?;

        ctx.data::<LedgerState>()?
            .with_ledger(|ledger| ledger.summary(filter.month, filter.year))
            .map(SummaryObject::from)
            .map_err(into_graphql_error)
    }
}

/// The root of all GraphQL mutations.
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Create a transaction.
    async fn create_transaction(
        &self,
        ctx: &Context<'_>,
        input: TransactionInputObject,
    ) -> async_graphql::Result<CreateTransactionPayload> {
        let input = TransactionInput::from(input);
        let result = ctx
            .data::<LedgerState>()?
            .with_ledger(|ledger| ledger.create(&input));

        Ok(match into_outcome(result)? {
            Ok(transaction) => CreateTransactionPayload {
                transaction: Some(TransactionObject(transaction)),
                success: true,
                error: None,
            },
            Err(message) => CreateTransactionPayload {
                transaction: None,
                success: false,
                error: Some(message),
            },
        })
    }

    /// Replace the details of the transaction with `id`.
    async fn update_transaction(
        &self,
        ctx: &Context<'_>,
        id: TransactionId,
        input: TransactionInputObject,
    ) -> async_graphql::Result<UpdateTransactionPayload> {
        let input = TransactionInput::from(input);
        let result = ctx
            .data::<LedgerState>()?
            .with_ledger(|ledger| ledger.update(id, &input));

        Ok(match into_outcome(result)? {
            Ok(transaction) => UpdateTransactionPayload {
                transaction: Some(TransactionObject(transaction)),
                success: true,
                error: None,
            },
            Err(message) => UpdateTransactionPayload {
                transaction: None,
                success: false,
                error: Some(message),
            },
        })
    }

    /// Delete the transaction with `id`.
    async fn delete_transaction(
        &self,
        ctx: &Context<'_>,
        id: TransactionId,
    ) -> async_graphql::Result<DeleteTransactionPayload> {
        let result = ctx
            .data::<LedgerState>()?
            .with_ledger(|ledger| ledger.delete(id));

        Ok(match into_outcome(result)? {
            Ok(()) => DeleteTransactionPayload {
                success: true,
                error: None,
            },
            Err(message) => DeleteTransactionPayload {
                success: false,
                error: Some(message),
            },
        })
    }
}

fn into_filter(filters: TransactionFilters) -> Result<TransactionFilter, async_graphql::Error> {
    let month = filters
        .month
        .map(u8::try_from)
        .transpose()
        .map_err(|_| into_graphql_error(Error::InvalidFilter("month is out of range".to_owned())))?;

    Ok(TransactionFilter {
        kind: filters.kind,
        month,
        year: filters.year,
    })
}

/// Client errors become the `Err` message for a mutation payload, anything
/// else becomes a GraphQL error.
fn into_outcome<T>(result: Result<T, Error>) -> async_graphql::Result<Result<T, String>> {
    match result {
        Ok(value) => Ok(Ok(value)),
        Err(error) if error.is_client_error() => Ok(Err(error.to_string())),
        Err(error) => Err(into_graphql_error(error)),
    }
}

fn into_graphql_error(error: Error) -> async_graphql::Error {
    if error.is_client_error() {
        async_graphql::Error::new(error.to_string())
    } else {
        tracing::error!("An unexpected error occurred: {error}");
        async_graphql::Error::new("Internal server error")
    }
}
