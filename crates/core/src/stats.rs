//! Runtime statistics collection and reporting.
//!
//! This module tracks how the translation cache performs. It provides:
//! 1. **Translation:** Blocks compiled, cache flushes, and PCs left to the interpreter.
//! 2. **Dispatch:** Blocks and guest instructions executed through native code.
//! 3. **Lookup:** Successor prediction and block map hit rates.
//! 4. **Events:** Fallback handler calls and traps taken.

/// Runtime statistics for one CPU and its JIT.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JitStats {
    /// Blocks compiled and registered in the block map.
    pub blocks_compiled: u64,
    /// Blocks dispatched to native code.
    pub blocks_executed: u64,
    /// Guest instructions covered by dispatched blocks.
    pub instructions_executed: u64,
    /// Dispatches resolved by the previous block's successor prediction.
    pub predict_hits: u64,
    /// Predictions that were present but stale or pointed elsewhere.
    pub predict_misses: u64,
    /// Lookups answered by the block map.
    pub map_hits: u64,
    /// Lookups the block map could not answer.
    pub map_misses: u64,
    /// Full flushes of the code buffer and block map.
    pub cache_flushes: u64,
    /// PCs that could not be compiled and were returned to the interpreter.
    pub uncached_dispatches: u64,
    /// Instructions executed through a fallback handler.
    pub fallback_calls: u64,
    /// Traps taken by the hart.
    pub traps_taken: u64,
}

impl JitStats {
    /// Percentage of predictions that named the block actually executed.
    ///
    /// # Returns
    ///
    /// A value in `[0, 100]`, or zero when no prediction was consulted.
    pub fn predict_accuracy(&self) -> f64 {
        let total = self.predict_hits + self.predict_misses;
        if total == 0 {
            0.0
        } else {
            100.0 * self.predict_hits as f64 / total as f64
        }
    }

    /// Percentage of block map lookups that found a block.
    ///
    /// # Returns
    ///
    /// A value in `[0, 100]`, or zero when the map was never consulted.
    pub fn map_hit_rate(&self) -> f64 {
        let total = self.map_hits + self.map_misses;
        if total == 0 {
            0.0
        } else {
            100.0 * self.map_hits as f64 / total as f64
        }
    }

    /// Average number of guest instructions per dispatched block.
    pub fn avg_block_len(&self) -> f64 {
        if self.blocks_executed == 0 {
            0.0
        } else {
            self.instructions_executed as f64 / self.blocks_executed as f64
        }
    }

    /// Prints a statistics report to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("RV32 JIT STATISTICS");
        println!("==========================================================");
        println!("TRANSLATION");
        println!("  jit.blocks_compiled    {}", self.blocks_compiled);
        println!("  jit.cache_flushes      {}", self.cache_flushes);
        println!("  jit.uncached           {}", self.uncached_dispatches);
        println!("----------------------------------------------------------");
        println!("DISPATCH");
        println!("  jit.blocks_executed    {}", self.blocks_executed);
        println!("  jit.insts_executed     {}", self.instructions_executed);
        println!("  jit.avg_block_len      {:.2}", self.avg_block_len());
        println!("----------------------------------------------------------");
        println!("LOOKUP");
        println!(
            "  predict.hits           {} ({:.2}%)",
            self.predict_hits,
            self.predict_accuracy()
        );
        println!("  predict.misses         {}", self.predict_misses);
        println!(
            "  map.hits               {} ({:.2}%)",
            self.map_hits,
            self.map_hit_rate()
        );
        println!("  map.misses             {}", self.map_misses);
        println!("----------------------------------------------------------");
        println!("EVENTS");
        println!("  fallback.calls         {}", self.fallback_calls);
        println!("  traps.taken            {}", self.traps_taken);
        println!("==========================================================");
    }
}
