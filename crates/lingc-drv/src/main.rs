use lingc_drv::{Config, Session};

fn main() {
    let config = Config::from_args();
    let mut session = Session::new(config);
    std::process::exit(session.run());
}
