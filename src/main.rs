use wmapsym_flow::StartFlow;

fn main() {
    let flow = match StartFlow::from_args() {
        Ok(flow) => flow,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            std::process::exit(2);
        }
    };

    // Other interfaces can be implemented.
    // Switch between them via feature flags.
    #[cfg(feature = "interface_cli")]
    {
        std::process::exit(wmapsym_cli::cli_main(flow));
    }
}
