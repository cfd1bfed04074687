//! Per-frame context handed to subsystems and components

/// State of the frame currently being processed
#[derive(Debug, Clone, PartialEq)]
pub struct FrameContext {
    frame: u64,
    delta_time: f32,
    quit_requested: bool,
}

impl FrameContext {
    /// Create the context for frame number `frame`
    pub fn new(frame: u64, delta_time: f32) -> Self {
        Self {
            frame,
            delta_time,
            quit_requested: false,
        }
    }

    /// Frame number, starting at 1 for the first update
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds since the previous frame
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Ask the engine to stop once this frame has finished
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Whether anything asked to stop during this frame
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}
