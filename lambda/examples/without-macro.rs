use event_transformer::{handle, Error, Event};
use lambda_runtime::{run, service_fn, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    event_transformer::logging::init();
    run(service_fn(func)).await?;
    Ok(())
}

async fn func(event: LambdaEvent<Event>) -> Result<Event, Error> {
    let (payload, context) = event.into_parts();
    handle(payload, context)
}
