// ⚙️ Request Tasks - run an Effect against the backend, report back as a Msg

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::ApiClient;
use crate::app::{Effect, Msg};

/// Runs one effect to completion
pub async fn perform(client: &ApiClient, effect: Effect) -> Msg {
    match effect {
        Effect::FetchReports(key) => Msg::ReportsFetched(key, client.list_reports().await),
        Effect::FetchReport(key) => {
            let id = key.target.clone().unwrap_or_default();
            Msg::ReportFetched(key, client.get_report(&id).await)
        }
        Effect::Upload(key, file) => Msg::Uploaded(key, client.upload_report(&file).await),
    }
}

/// Spawns the effect on the runtime; the result lands on `tx`
pub fn dispatch(handle: &Handle, client: &ApiClient, effect: Effect, tx: &UnboundedSender<Msg>) {
    let client = client.clone();
    let tx = tx.clone();
    handle.spawn(async move {
        let msg = perform(&client, effect).await;
        if tx.send(msg).is_err() {
            tracing::debug!("UI gone before request settled");
        }
    });
}
