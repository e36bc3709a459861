//! 通用无序集合
//!
//! 对 `HashSet` 的薄封装，提供批量增删、合并、替换和可提前终止的遍历。
//! 遍历顺序不作保证。

use std::collections::HashSet;
use std::hash::Hash;

/// 无序去重集合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Set<E: Eq + Hash> {
    elements: HashSet<E>,
}

impl<E: Eq + Hash> Set<E> {
    /// 创建空集合
    pub fn new() -> Self {
        Self {
            elements: HashSet::new(),
        }
    }

    /// 添加元素
    pub fn add(&mut self, elements: impl IntoIterator<Item = E>) {
        self.elements.extend(elements);
    }

    /// 移除元素
    pub fn remove<'a>(&mut self, elements: impl IntoIterator<Item = &'a E>)
    where
        E: 'a,
    {
        for element in elements {
            self.elements.remove(element);
        }
    }

    /// 是否包含指定元素
    pub fn contains(&self, element: &E) -> bool {
        self.elements.contains(element)
    }

    /// 清空集合
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.elements.iter()
    }

    /// 遍历元素，访问函数返回 `false` 时提前终止
    pub fn for_each(&self, mut visit: impl FnMut(&E) -> bool) {
        for element in &self.elements {
            if !visit(element) {
                break;
            }
        }
    }
}

impl<E: Eq + Hash + Clone> Set<E> {
    /// 将另一个集合并入当前集合
    pub fn combine(&mut self, other: &Set<E>) {
        self.elements.extend(other.elements.iter().cloned());
    }

    /// 用另一个集合的内容替换当前内容
    pub fn set(&mut self, other: &Set<E>) {
        self.clear();
        self.combine(other);
    }
}

impl<E: Eq + Hash> Default for Set<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Eq + Hash> FromIterator<E> for Set<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<E: Eq + Hash> Extend<E> for Set<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}
