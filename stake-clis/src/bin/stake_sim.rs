use stake_clis::error::exit_with_error;
use stake_clis::stake_sim;

pub fn main() {
    if let Err(err) = stake_sim::run() {
        exit_with_error(err, 1)
    }
}
