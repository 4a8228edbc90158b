//! 频隙
//!
//! 频隙的 free/used 状态是频谱占用的唯一事实来源。重复占用或重复释放属于调用方的
//! 契约错误，任何构建配置下都直接 panic。

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    index: usize,
    free: bool,
}

impl Slot {
    pub fn new(index: usize) -> Self {
        Self { index, free: true }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_free(&self) -> bool {
        self.free
    }

    pub fn occupy(&mut self) {
        assert!(self.free, "slot {} is already in use", self.index);
        self.free = false;
    }

    pub fn release(&mut self) {
        assert!(!self.free, "slot {} released while free", self.index);
        self.free = true;
    }
}

/// 一段连续频隙 [start, start + width)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotWindow {
    pub start: usize,
    pub width: usize,
}

impl SlotWindow {
    pub fn new(start: usize, width: usize) -> Self {
        Self { start, width }
    }

    /// 不含的结束下标
    pub fn end(&self) -> usize {
        self.start + self.width
    }

    pub fn indices(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn overlaps(&self, other: &SlotWindow) -> bool {
        self.start < other.end() && other.start < self.end()
    }
}
