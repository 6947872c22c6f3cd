//! Backend commands queued from UI to backend worker.

pub enum BackendCommand {
    Predict {
        headline: String,
        body: String,
        url: String,
    },
    CheckHealth,
}
