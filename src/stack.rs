/// A LIFO container shared by the parser, the NFA builder and the
/// closure/subset searches.
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes the top item. `None` is an underflow; callers decide whether
    /// that is an input error or a bug.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Stack;

    #[test]
    fn last_in_first_out() {
        let mut s = Stack::new();
        s.push('a');
        s.push('b');
        assert_eq!(s.peek(), Some(&'b'));
        assert_eq!(s.len(), 2);
        assert_eq!(s.pop(), Some('b'));
        assert_eq!(s.pop(), Some('a'));
        assert!(s.is_empty());
    }

    #[test]
    fn underflow_is_none() {
        let mut s: Stack<u8> = Stack::new();
        assert_eq!(s.pop(), None);
        assert_eq!(s.peek(), None);
    }
}
