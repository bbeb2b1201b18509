//! `docpoll config` – show the effective policy.

use docpoll_core::config::DocpollConfig;

pub fn run_config(cfg: &DocpollConfig) {
    let p = &cfg.document_reader;
    println!("{}", p);
    println!("{}", p.describe_file_size_limits());
    match cfg.poll_deadline() {
        Some(d) => println!("poll deadline: {:?}", d),
        None => println!("poll deadline: none"),
    }
    if let Err(e) = p.validate() {
        println!("warning: {}", e);
    }
}
