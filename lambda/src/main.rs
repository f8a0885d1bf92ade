use event_transformer::{lambda, Error, Event};
use lambda_runtime::Context;

#[lambda]
#[tokio::main]
async fn main(event: Event, context: Context) -> Result<Event, Error> {
    event_transformer::handle(event, context)
}
