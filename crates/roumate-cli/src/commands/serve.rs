//! `roumate serve` — start the HTTP history backend.

use std::path::PathBuf;

pub fn run(data_dir: PathBuf, host: &str, port: u16) {
    let base = format!("http://{host}:{port}");

    println!("Roumate history server v{}", roumate_core::VERSION);
    println!("   {base}");
    println!("   Data directory: {}", data_dir.display());
    println!();
    println!("   Endpoints:");
    println!("     GET    /                        API index (try: curl {base})");
    println!("     GET    /api/roulette/history    Stored history for ?table=&user=");
    println!("     POST   /api/roulette/inputs     Append outcomes (atomic batch)");
    println!("     DELETE /api/roulette/history    Reset history for ?table=&user=");
    println!("     GET    /api/roulette/stats      Aggregate report, ?window= selects the tail");
    println!("     GET    /health                  Health check");
    println!();
    println!("   Examples:");
    println!("     curl '{base}/api/roulette/history?table=european&user=ada'");
    println!("     curl -X POST {base}/api/roulette/inputs \\");
    println!("          -H 'Content-Type: application/json' \\");
    println!("          -d '{{\"table\":\"european\",\"user\":\"ada\",\"inputs\":[19,0,3]}}'");
    println!("     curl '{base}/api/roulette/stats?table=european&user=ada&window=50'");
    println!();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error starting runtime: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = rt.block_on(roumate_server::run_server(data_dir, host, port)) {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
