use crate::http::prober::LatencyProber;
use crate::http::session::Session;
use crate::parser::CommandArgument;
use std::io;

pub mod prober;
pub mod session;

/// 探测一次并输出耗时
pub fn execute() {
    let mut command = CommandArgument::new();
    command.parse();
    let session = Session::open();
    let prober = LatencyProber::new();
    info!("{}", prober);
    let measurement = prober.probe(&session);
    let stdout = io::stdout();
    if let Err(err) = measurement.report(&mut stdout.lock()) {
        debug!("could not write result: {}", err);
    }
    // 最后释放全局会话
    drop(session);
}
