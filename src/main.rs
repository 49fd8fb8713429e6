use tc_trigger::{ops, TcResult};

/// Entry function of `tc`.
fn main() -> TcResult<()> {
    ops::exec()
}
