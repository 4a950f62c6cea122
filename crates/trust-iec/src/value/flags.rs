use bitflags::bitflags;

bitflags! {
    /// Configuration attributes of a value. Set by the host, preserved
    /// across retyping.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        /// Reachability marker for an external collector.
        const MARK = 0x01;
        const PERSIST = 0x02;
        const RETAIN = 0x04;
        /// Block-local persistence; set on bistable and edge outputs.
        const MAINTAIN = 0x08;
        const CONSTANT = 0x10;
    }
}

bitflags! {
    /// Runtime state bits owned by the operators.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StateFlags: u8 {
        /// One-time lazy setup has run (timers).
        const INITIALIZED = 0x01;
        /// Edge detectors keep the previous sample here.
        const FLAG1 = 0x02;
        const FLAG2 = 0x04;
    }
}
