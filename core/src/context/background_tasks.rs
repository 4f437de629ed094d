use tokio::task::JoinHandle;

#[derive(Default)]
pub struct BackgroundTasks {
    pub sweep: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.sweep.take() {
            handle.abort();
        }
    }
}
