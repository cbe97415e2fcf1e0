use latency_probe::execute;

fn main() {
    //初始化日志
    pretty_env_logger::init_timed();
    execute();
}
