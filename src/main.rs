fn main() {
    onionfetch::cli::run();
}
