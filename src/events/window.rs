use std::fmt;

/// Приложение, владеющее активным окном
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForegroundApp {
    pub pid: u32,
    pub name: String,
}

impl ForegroundApp {
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            name: String::new(),
        }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = name;
        self
    }
}

impl fmt::Display for ForegroundApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "pid {}", self.pid)
        } else {
            write!(f, "\"{}\" (pid {})", self.name, self.pid)
        }
    }
}

/// Результат сворачивания окон приложения
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizeReport {
    pub app: ForegroundApp,
    pub minimized: usize,
}

impl fmt::Display for MinimizeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "свернуто {} окон(а) приложения {}", self.minimized, self.app)
    }
}
